/// The single visible status message. A new outcome replaces the old one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub error_msg: String,
    pub success_msg: String,
    pub show_error: bool,
    pub show_success: bool,
}

impl StatusLine {
    pub fn error(&mut self, msg: impl Into<String>) {
        self.error_msg = msg.into();
        self.show_success = false;
        self.show_error = true;
    }

    pub fn success(&mut self, msg: impl Into<String>) {
        self.success_msg = msg.into();
        self.show_success = true;
        self.show_error = false;
    }

    /// The message currently shown, if any, tagged `Err` for errors.
    pub fn visible(&self) -> Option<Result<&str, &str>> {
        if self.show_error {
            Some(Err(self.error_msg.as_str()))
        } else if self.show_success {
            Some(Ok(self.success_msg.as_str()))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_message_wins() {
        let mut status = StatusLine::default();
        assert_eq!(status.visible(), None);

        status.error("boom");
        assert_eq!(status.visible(), Some(Err("boom")));

        status.success("done");
        assert_eq!(status.visible(), Some(Ok("done")));
        assert!(!status.show_error);

        status.error("again");
        assert!(!status.show_success);
        assert_eq!(status.visible(), Some(Err("again")));
    }
}
