// Resume relay: accept the browser upload, re-wrap it, forward it once to the
// matching service and normalize whatever comes back.
// Outbound HTTP goes through matcher_client only.

pub mod handlers;
pub mod payload;
pub mod upload;
