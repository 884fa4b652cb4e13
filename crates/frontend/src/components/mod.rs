pub mod login_link;

pub use login_link::LoginLink;
