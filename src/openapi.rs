use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ErrorResponse;
use crate::handlers::facilities::FacilityPayload;
use crate::services::facilities::FacilityRecord;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Facilities API",
        description = "CRUD backend for catering facilities, their locations and tags"
    ),
    paths(
        crate::handlers::facilities::list_facilities,
        crate::handlers::facilities::get_facility,
        crate::handlers::facilities::create_facility,
        crate::handlers::facilities::update_facility,
        crate::handlers::facilities::delete_facility,
        crate::handlers::facilities::search_facilities,
    ),
    components(schemas(FacilityRecord, FacilityPayload, ErrorResponse)),
    tags((name = "facilities", description = "Facility management endpoints"))
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the generated document from
/// `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
