//! Command table
//!
//! Every externally reachable operation has exactly one entry here. The server
//! routes `POST /cmd/{name}` through this table and the client builds its URLs
//! from it, so the two cannot drift apart.

/// Named command accepted by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    IssueInviteCode,
    RevokeInviteCode,
    VerifyToken,
    SignUp,
    SignIn,
    SignOut,
    ChangePassword,
}

impl Command {
    /// All commands, in routing order
    pub const ALL: [Command; 7] = [
        Command::IssueInviteCode,
        Command::RevokeInviteCode,
        Command::VerifyToken,
        Command::SignUp,
        Command::SignIn,
        Command::SignOut,
        Command::ChangePassword,
    ];

    /// Wire name, `group/action`
    pub fn name(self) -> &'static str {
        match self {
            Self::IssueInviteCode => "admin/issue-invite-code",
            Self::RevokeInviteCode => "admin/revoke-invite-code",
            Self::VerifyToken => "admin/verify-token",
            Self::SignUp => "user/sign-up",
            Self::SignIn => "user/sign-in",
            Self::SignOut => "user/sign-out",
            Self::ChangePassword => "user/change-password",
        }
    }

    /// Look up a command by wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// URL path relative to the service root
    pub fn path(self) -> String {
        format!("/cmd/{}", self.name())
    }

    /// Whether a successful call changes state and must be persisted
    pub fn is_mutation(self) -> bool {
        !matches!(self, Self::VerifyToken)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), Some(command));
        }
        assert_eq!(Command::from_name("user/delete-account"), None);
        assert_eq!(Command::from_name(""), None);
    }

    #[test]
    fn test_only_verify_is_read_only() {
        let read_only: Vec<_> = Command::ALL
            .into_iter()
            .filter(|c| !c.is_mutation())
            .collect();
        assert_eq!(read_only, vec![Command::VerifyToken]);
    }

    #[test]
    fn test_path() {
        assert_eq!(Command::SignIn.path(), "/cmd/user/sign-in");
    }
}
