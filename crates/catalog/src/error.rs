use snafu::{prelude::*, Backtrace};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Table or view `{}` not found", name))]
    TableOrViewNotFound {
        name: String,
    },

    #[snafu(display("Index `{}` not found", name))]
    IndexNotFound {
        name: String,
    },

    #[snafu(display("Sequence `{}` not found", name))]
    SequenceNotFound {
        name: String,
    },

    #[snafu(display("Constraint `{}` not found", name))]
    ConstraintNotFound {
        name: String,
    },

    #[snafu(display("Constant `{}` not found", name))]
    ConstantNotFound {
        name: String,
    },

    #[snafu(display("Object `{}` already exists", name))]
    DuplicateName {
        backtrace: Backtrace,
        name: String,
    },

    #[snafu(display("internal error: {}", detail))]
    Internal {
        backtrace: Backtrace,
        detail: String,
    },

    #[snafu(display("error removing schema object: {}", source))]
    Database {
        source: Box<dyn std::error::Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
