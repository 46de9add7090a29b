use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Consultant,
    Operator,
    Company,
}

impl FromStr for Role {
    type Err = PrincipalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "consultant" => Ok(Role::Consultant),
            "operator" => Ok(Role::Operator),
            "company" => Ok(Role::Company),
            _ => Err(PrincipalError::UnknownRole),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrincipalError {
    #[error("unknown role")]
    UnknownRole,

    #[error("company users must belong to a company")]
    MissingCompany,

    #[error("principal may not perform that action")]
    Forbidden,
}

/// Authenticated caller as resolved by the gateway in front of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub role: Role,
    pub company_id: Option<Uuid>,
}

impl Principal {
    pub fn new(
        user_id: String,
        role: Role,
        company_id: Option<Uuid>,
    ) -> Result<Self, PrincipalError> {
        if role == Role::Company && company_id.is_none() {
            return Err(PrincipalError::MissingCompany);
        }

        Ok(Self {
            user_id,
            role,
            company_id,
        })
    }

    pub fn can_manage_dates(&self) -> bool {
        self.role != Role::Company
    }

    /// Company the caller may read. Company users are pinned to their own.
    pub fn company_scope(&self, requested: Option<Uuid>) -> Result<Option<Uuid>, PrincipalError> {
        if self.role != Role::Company {
            return Ok(requested);
        }

        match (self.company_id, requested) {
            (Some(own), None) => Ok(Some(own)),
            (Some(own), Some(requested)) if own == requested => Ok(Some(own)),
            _ => Err(PrincipalError::Forbidden),
        }
    }
}
