//! git-flow branch naming taxonomy.

pub const MAIN_BRANCH: &str = "main";
pub const DEV_BRANCH: &str = "dev";

/// Short-lived git-flow branch prefixes, in planning precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPrefix {
    Feature,
    Hotfix,
    Bugfix,
    Release,
}

impl FlowPrefix {
    pub const ALL: [FlowPrefix; 4] = [Self::Feature, Self::Hotfix, Self::Bugfix, Self::Release];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feature => "feature/",
            Self::Hotfix => "hotfix/",
            Self::Bugfix => "bugfix/",
            Self::Release => "release/",
        }
    }

    /// Hotfixes and releases land on `main` and must also reach `dev`.
    pub fn needs_dev_backport(self) -> bool {
        matches!(self, Self::Hotfix | Self::Release)
    }
}

/// Classification of a branch name. Prefix matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind<'a> {
    Main,
    Dev,
    Flow { prefix: FlowPrefix, name: &'a str },
    Unrecognized,
}

impl<'a> BranchKind<'a> {
    pub fn classify(branch: &'a str) -> Self {
        match branch {
            MAIN_BRANCH => return Self::Main,
            DEV_BRANCH => return Self::Dev,
            _ => {}
        }

        FlowPrefix::ALL
            .into_iter()
            .find_map(|prefix| {
                branch
                    .strip_prefix(prefix.as_str())
                    .map(|name| Self::Flow { prefix, name })
            })
            .unwrap_or(Self::Unrecognized)
    }
}

/// Case-insensitive `feature/` check used before creating `main`/`dev`.
pub fn is_feature_branch(branch: &str) -> bool {
    strip_feature_prefix(branch).is_some()
}

/// Strips `feature/` regardless of case, as `git flow feature` expects bare names.
pub fn strip_feature_prefix(branch: &str) -> Option<&str> {
    let prefix = FlowPrefix::Feature.as_str();
    let (head, name) = branch.split_at_checked(prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then_some(name)
}
