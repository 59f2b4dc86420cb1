/// Authentication.
pub(crate) mod authentication;

/// Token transfers.
pub(crate) mod transfer;

pub(crate) use authentication::{Authenticate, Authentication};
pub(crate) use transfer::TransferUtils;
