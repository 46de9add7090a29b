mod principal;

pub use principal::{COMPANY_HEADER, ROLE_HEADER, USER_HEADER, principal};
