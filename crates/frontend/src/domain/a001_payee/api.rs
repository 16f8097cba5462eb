use async_trait::async_trait;
use contracts::domain::a001_payee::{CreatePayeeDto, GetPayeeRequest, Payee, PayeeId};
use contracts::shared::api_response::ApiResponse;
use log::{info, warn};

use crate::shared::api_utils::post_json;
use crate::shared::config::endpoints;
use crate::shared::error::AppError;
use crate::system::auth::RequestContext;

/// Remote vendor endpoints.
#[async_trait(?Send)]
pub trait PayeeApi {
    /// Every vendor of the location, unfiltered and unsorted.
    async fn get_payees(&self, ctx: &RequestContext) -> Result<Vec<Payee>, AppError>;

    /// Create a vendor. The returned record may carry a placeholder id when
    /// the service did not echo the stored one.
    async fn add_payee(&self, ctx: &RequestContext, dto: &CreatePayeeDto)
        -> Result<Payee, AppError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HttpPayeeApi;

#[async_trait(?Send)]
impl PayeeApi for HttpPayeeApi {
    async fn get_payees(&self, ctx: &RequestContext) -> Result<Vec<Payee>, AppError> {
        let request = GetPayeeRequest {
            location_id: ctx.location_id.clone(),
        };
        let response: ApiResponse<Vec<Payee>> =
            post_json(endpoints::GET_PAYEE, ctx, &request).await?;
        response
            .meta
            .check("Failed to load vendors")
            .map_err(AppError::LogicalFailure)?;
        Ok(response.data.unwrap_or_default())
    }

    async fn add_payee(
        &self,
        ctx: &RequestContext,
        dto: &CreatePayeeDto,
    ) -> Result<Payee, AppError> {
        let response: ApiResponse<Payee> = post_json(endpoints::ADD_PAYEE, ctx, dto).await?;
        response
            .meta
            .check("Failed to create vendor")
            .map_err(AppError::LogicalFailure)?;

        let created = created_payee(dto, response.data);
        info!("vendor created: {} ({})", created.name, created.id);
        Ok(created)
    }
}

/// The stored record when the service returned one with an id, otherwise a
/// local copy of the payload under a placeholder id.
pub fn created_payee(dto: &CreatePayeeDto, echoed: Option<Payee>) -> Payee {
    match echoed {
        Some(payee) if !payee.id.is_empty() => payee,
        _ => {
            warn!(
                "addPayee returned no id for {:?}; using a placeholder until reconciled",
                dto.name
            );
            Payee::from_create_dto(dto, PayeeId::placeholder())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CreatePayeeDto {
        CreatePayeeDto {
            name: "ACME".into(),
            phone_no: "555-0100".into(),
            location_id: "loc-1".into(),
            ..CreatePayeeDto::default()
        }
    }

    #[test]
    fn echoed_record_with_id_is_kept() {
        let echoed = Payee {
            id: PayeeId::new("p-9"),
            name: "Acme".into(),
            ..Payee::default()
        };
        let created = created_payee(&dto(), Some(echoed.clone()));
        assert_eq!(created, echoed);
    }

    #[test]
    fn missing_id_gets_placeholder() {
        let created = created_payee(&dto(), None);
        assert!(created.id.is_placeholder());
        assert_eq!(created.name, "ACME");

        let without_id = Payee {
            name: "ACME".into(),
            ..Payee::default()
        };
        assert!(created_payee(&dto(), Some(without_id)).id.is_placeholder());
    }
}
