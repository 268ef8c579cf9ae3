//

// rendezvous counters, guarded by the run state's lock
#[derive(Debug)]
pub struct Barrier {
    registered: usize,
    expected: usize,
}

impl Barrier {
    pub fn new(expected: usize) -> Self {
        Self {
            registered: 0,
            expected,
        }
    }

    // returns true for the registration that fills the barrier, whose
    // caller must wake everyone else
    pub fn register(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.registered += 1;
        self.is_open()
    }

    pub fn is_open(&self) -> bool {
        self.registered >= self.expected
    }

    pub fn registered(&self) -> usize {
        self.registered
    }

    pub fn expected(&self) -> usize {
        self.expected
    }
}
