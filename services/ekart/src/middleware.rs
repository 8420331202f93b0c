use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Mints a UUID for requests arriving without an `x-request-id`. Requests
/// that already carry one (stamped by a client or reverse proxy) keep it;
/// `SetRequestId` only calls this when the header is absent.
#[derive(Clone, Default)]
pub struct MakeEkartRequestId;

impl MakeRequestId for MakeEkartRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}

pub fn request_id_layer() -> SetRequestIdLayer<MakeEkartRequestId> {
    SetRequestIdLayer::new(
        HeaderName::from_static(REQUEST_ID_HEADER),
        MakeEkartRequestId,
    )
}

/// Echo the request id back on the response so clients can quote it when
/// reporting a failed call.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER))
}
