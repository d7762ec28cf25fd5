use crate::prelude::*;

/// The seam through which every request node reaches the network.
///
/// The engine only ever calls [`Transport::request`] synchronously and treats
/// whatever it returns as opaque: timeouts, TLS and connection reuse are the
/// implementor's business. Closures of the right shape are transports too,
/// which keeps test doubles short.
pub trait Transport: Send + Sync {
    fn request(&self, request: NetworkRequest) -> Result<NetworkResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(NetworkRequest) -> Result<NetworkResponse, TransportError> + Send + Sync,
{
    fn request(&self, request: NetworkRequest) -> Result<NetworkResponse, TransportError> {
        self(request)
    }
}
