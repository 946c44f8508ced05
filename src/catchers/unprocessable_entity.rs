use rocket::response::status;
use rocket::response::status::BadRequest;
use rocket::Request;

/// Payloads that are valid JSON but not a JSON object never reach the
/// field validator; they are still the client's fault.
#[catch(422)]
pub fn unprocessable_entity_to_bad_request(req: &Request) -> BadRequest<()> {
    tracing::info!(uri = %req.uri(), "Rejected a payload that is not a JSON object");
    status::BadRequest(())
}
