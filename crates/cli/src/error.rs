use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not read {}", _0.display())]
    Read(#[error(not(source))] PathBuf),
    #[display("could not load configuration")]
    Config,
    #[display("could not open storage")]
    Storage,
    #[display("could not load project {_0}")]
    Load(#[error(not(source))] String),
    #[display("could not write output")]
    Output,
}
