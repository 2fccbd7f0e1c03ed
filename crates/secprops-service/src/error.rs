use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service not started")]
    NotStarted,

    #[error("service already started")]
    AlreadyStarted,

    #[error("registry error: {0}")]
    Registry(#[from] secprops_registry::RegistryError),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
