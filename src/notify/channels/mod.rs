//! Concrete notification channels.

mod email;
mod ifttt;
mod pushover;
mod signal;
mod telegram;

pub use email::EmailChannel;
pub use ifttt::IftttChannel;
pub use pushover::PushoverChannel;
pub use signal::SignalChannel;
pub use telegram::TelegramChannel;

use super::ChannelError;

/// Map a non-2xx response to [`ChannelError::Status`].
fn check_status(response: &reqwest::Response) -> Result<(), ChannelError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ChannelError::Status(status))
    }
}

/// Join a base URL and a path without doubling the slash.
fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("http://h:8080/", "/v2/send"), "http://h:8080/v2/send");
        assert_eq!(join_url("http://h:8080", "v2/send"), "http://h:8080/v2/send");
    }
}
