pub mod digest;
pub mod entities;
pub mod locale;
pub mod modal;
pub mod share_message;
pub mod short_id;

pub use digest::{build_incoming_links_digest, build_outgoing_links_digest};
pub use entities::{MessageView, ModalView};
pub use locale::Locale;
pub use modal::{build_initial_modal, build_updated_modal};
pub use share_message::{build_share_message, ShareMessageView};

#[derive(Debug, PartialEq)]
pub enum Error {
    RenderTemplate,
}
