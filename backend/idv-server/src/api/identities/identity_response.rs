use crate::IdentityDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub identity: IdentityDto,
}
