pub mod config;
pub mod dispatcher;
pub mod extract;
pub mod response;

pub use dispatcher::{
    authorize, detect_envelope, handle, AuthorizerResponse, Decision, Envelope, Unauthorized,
};
pub use extract::extract_token;
pub use response::{PolicyResponse, SimpleResponse};
