use http::Method;
use http::header::HeaderName;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use voicetech_config::{AnyOrArray, CorsConfig};

/// Build a Tower CORS layer from configuration
///
/// Wildcards cannot be combined with credentials, so with `credentials = true`
/// a wildcard mirrors the request instead.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();
    let mirror = config.credentials;

    // Origins
    layer = match &config.origins {
        AnyOrArray::Any if mirror => layer.allow_origin(AllowOrigin::mirror_request()),
        AnyOrArray::Any => layer.allow_origin(AllowOrigin::any()),
        AnyOrArray::List(origins) => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            layer.allow_origin(origins)
        }
    };

    // Methods
    layer = match &config.methods {
        AnyOrArray::Any if mirror => layer.allow_methods(AllowMethods::mirror_request()),
        AnyOrArray::Any => layer.allow_methods(AllowMethods::any()),
        AnyOrArray::List(methods) => {
            let methods: Vec<Method> = methods.iter().filter_map(|m| m.parse().ok()).collect();
            layer.allow_methods(methods)
        }
    };

    // Headers
    layer = match &config.headers {
        AnyOrArray::Any if mirror => layer.allow_headers(AllowHeaders::mirror_request()),
        AnyOrArray::Any => layer.allow_headers(AllowHeaders::any()),
        AnyOrArray::List(headers) => {
            let headers: Vec<HeaderName> = headers.iter().filter_map(|h| h.parse().ok()).collect();
            layer.allow_headers(headers)
        }
    };

    // Request ids are echoed on synthesis responses
    layer = layer.expose_headers([tts::REQUEST_ID_HEADER.clone()]);

    if config.credentials {
        layer = layer.allow_credentials(true);
    }

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}
