use uuid::Uuid;

/// Resolved capabilities of one user within one league. Built once per
/// request by `MemberRepository::resolve_roles` and consumed by the
/// submission state machine's authorization gate, instead of re-checking
/// officials and captaincy tables at every call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueRoles {
    pub is_host: bool,
    pub is_governor: bool,
    pub captain_of: Option<Uuid>,
}

impl LeagueRoles {
    /// Hosts and governors validate anything; captains only entries owned
    /// by members of their own team.
    pub fn can_validate_entry(&self, entry_team: Option<Uuid>) -> bool {
        if self.is_host || self.is_governor {
            return true;
        }
        match (self.captain_of, entry_team) {
            (Some(captained), Some(team)) => captained == team,
            _ => false,
        }
    }

    /// Flipping an already-decided entry (approved -> rejected or back) is
    /// reserved for hosts and governors.
    pub fn can_override(&self) -> bool {
        self.is_host || self.is_governor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_validates_any_team() {
        let roles = LeagueRoles {
            is_host: true,
            ..Default::default()
        };
        assert!(roles.can_validate_entry(Some(Uuid::new_v4())));
        assert!(roles.can_validate_entry(None));
        assert!(roles.can_override());
    }

    #[test]
    fn test_captain_limited_to_own_team() {
        let team = Uuid::new_v4();
        let roles = LeagueRoles {
            captain_of: Some(team),
            ..Default::default()
        };
        assert!(roles.can_validate_entry(Some(team)));
        assert!(!roles.can_validate_entry(Some(Uuid::new_v4())));
        assert!(!roles.can_validate_entry(None));
        assert!(!roles.can_override());
    }

    #[test]
    fn test_plain_member_validates_nothing() {
        let roles = LeagueRoles::default();
        assert!(!roles.can_validate_entry(Some(Uuid::new_v4())));
        assert!(!roles.can_override());
    }
}
