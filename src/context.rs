/// The parts of an inbound HTTP request the CORS engine looks at.
///
/// Absent headers are `None`; the engine distinguishes a missing header
/// from an empty one.
#[derive(Debug, Clone, Default)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    /// Request scheme as seen by the server, e.g. `http` or `https`.
    pub scheme: &'a str,
    pub host: Option<&'a str>,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
}
