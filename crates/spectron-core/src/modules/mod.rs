pub mod catalog;
pub mod serialization;
pub mod session;
pub mod spectrum;
pub mod synthesis;
pub mod upload;

mod helpers;

pub use catalog::{parse_catalog, upper_state_energy};
pub use session::{
    Figure, RenderOutput, Session, SessionId, SessionStateError, SessionStore, SessionStoreError,
    read_session_state, write_session_state,
};
pub use spectrum::parse_spectrum;
pub use synthesis::{
    LineProfile, LteGaussianSynthesizer, SpectrumSynthesizer, SynthesisResult, SynthesisWarning,
};
pub use upload::{
    Upload, UploadFile, UploadOutcome, classify_upload, decode_upload, parse_upload,
    upload_catalog, upload_catalog_batch, upload_spectrum,
};
