//

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "at least one consumer is required")]
    NoConsumers,
    #[fail(display = "cancelled")]
    Cancelled,
    #[fail(display = "{} thread panicked", _0)]
    WorkerPanicked(&'static str),
    #[fail(display = "io error: {}", _0)]
    Io(#[cause] std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
