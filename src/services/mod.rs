pub mod response;
pub mod text_file;
pub mod translation;

pub use response::TranslationResponse;
pub use translation::{
    Endpoint, HttpRequest, HttpTransport, RequestMethod, TranslateError, TranslationRequest,
    Transport,
};
