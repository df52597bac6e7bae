//! Message builders for the account flow emails

use super::EmailMessage;

/// Sign-up confirmation email carrying the action link
pub fn sign_up_confirm(to: &str, link: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Sign Up Confirmation".to_string(),
        body: format!(
            "<h1>Sign Up Confirmation</h1>\n<a href=\"{}\">Click here to complete sign up</a>",
            link
        ),
    }
}

/// Notice sent when a sign-up uses an email that already has an account
pub fn attempted_sign_up(to: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Sign up attempt made with this email address".to_string(),
        body: "<h1>Sign Up Attempt</h1>\n<p>An attempt to sign up to Inkwell was made with \
               this email address, but an account already exists.</p>"
            .to_string(),
    }
}

/// Password reset email carrying the action link
pub fn password_reset(to: &str, link: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Password reset request".to_string(),
        body: format!(
            "<h1>Password Reset</h1>\n<a href=\"{}\">Click here to reset your password</a>",
            link
        ),
    }
}

/// Account closure email carrying the action link
pub fn account_close(to: &str, link: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Close account request".to_string(),
        body: format!(
            "<h1>Close Account</h1>\n<a href=\"{}\">Click here to close your account</a>",
            link
        ),
    }
}
