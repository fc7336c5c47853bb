use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "florascan API",
        version = "1.0.0",
        description = "Flower image classification service: upload an image, get back a \
                       category and confidence. Low-confidence and out-of-domain uploads \
                       are reported as unknown.",
        license(name = "MIT")
    ),
    tags(
        (name = "home", description = "Connection probe"),
        (name = "health", description = "Health check endpoints"),
        (name = "predict", description = "Image classification"),
        (name = "history", description = "Prediction history")
    ),
    paths(
        crate::home,
        crate::routes::health::health,
        crate::routes::predict::predict,
        crate::routes::history::history,
    ),
    components(schemas(
        crate::HomeResponse,
        crate::routes::health::HealthResponse,
        crate::routes::predict::PredictResponse,
        crate::routes::history::HistoryResponse,
    ))
)]
pub struct ApiDoc;
