//! The widget site's route table and handlers.
//!
//! Every handler answers with its own name followed by its bound
//! parameters, one line, e.g. `apiUpdateWidgetPart foo 1`.

use crate::routing::matcher::Params;
use crate::routing::pattern::{Method, RouteError};
use crate::routing::router::{MatchStrategy, RouteSpec, Router};

/// Registration order matters only for `Allow` accumulation.
pub const WIDGET_ROUTES: &[RouteSpec] = &[
    RouteSpec {
        method: Method::Get,
        template: "/",
        name: "home",
        handler: home,
    },
    RouteSpec {
        method: Method::Get,
        template: "/contact",
        name: "contact",
        handler: contact,
    },
    RouteSpec {
        method: Method::Get,
        template: "/api/widgets",
        name: "apiGetWidgets",
        handler: api_get_widgets,
    },
    RouteSpec {
        method: Method::Post,
        template: "/api/widgets",
        name: "apiCreateWidget",
        handler: api_create_widget,
    },
    RouteSpec {
        method: Method::Post,
        template: "/api/widgets/{slug}",
        name: "apiUpdateWidget",
        handler: api_update_widget,
    },
    RouteSpec {
        method: Method::Post,
        template: "/api/widgets/{slug}/parts",
        name: "apiCreateWidgetPart",
        handler: api_create_widget_part,
    },
    RouteSpec {
        method: Method::Post,
        template: "/api/widgets/{slug}/parts/{id:int}/update",
        name: "apiUpdateWidgetPart",
        handler: api_update_widget_part,
    },
    RouteSpec {
        method: Method::Post,
        template: "/api/widgets/{slug}/parts/{id:int}/delete",
        name: "apiDeleteWidgetPart",
        handler: api_delete_widget_part,
    },
    RouteSpec {
        method: Method::Get,
        template: "/{slug}",
        name: "widget",
        handler: widget,
    },
    RouteSpec {
        method: Method::Get,
        template: "/{slug}/admin",
        name: "widgetAdmin",
        handler: widget_admin,
    },
    RouteSpec {
        method: Method::Post,
        template: "/{slug}/image",
        name: "widgetImage",
        handler: widget_image,
    },
];

/// Compile [`WIDGET_ROUTES`] into a ready router.
pub fn widget_router(strategy: MatchStrategy) -> Result<Router, RouteError> {
    Router::from_specs(WIDGET_ROUTES, strategy)
}

fn slug(params: &Params) -> &str {
    params.get_str("slug").unwrap_or_default()
}

fn part_id(params: &Params) -> u64 {
    params.get_int("id").unwrap_or_default()
}

fn home(_: &Params) -> String {
    "home\n".to_string()
}

fn contact(_: &Params) -> String {
    "contact\n".to_string()
}

fn api_get_widgets(_: &Params) -> String {
    "apiGetWidgets\n".to_string()
}

fn api_create_widget(_: &Params) -> String {
    "apiCreateWidget\n".to_string()
}

fn api_update_widget(params: &Params) -> String {
    format!("apiUpdateWidget {}\n", slug(params))
}

fn api_create_widget_part(params: &Params) -> String {
    format!("apiCreateWidgetPart {}\n", slug(params))
}

fn api_update_widget_part(params: &Params) -> String {
    format!("apiUpdateWidgetPart {} {}\n", slug(params), part_id(params))
}

fn api_delete_widget_part(params: &Params) -> String {
    format!("apiDeleteWidgetPart {} {}\n", slug(params), part_id(params))
}

fn widget(params: &Params) -> String {
    format!("widget {}\n", slug(params))
}

fn widget_admin(params: &Params) -> String {
    format!("widgetAdmin {}\n", slug(params))
}

fn widget_image(params: &Params) -> String {
    format!("widgetImage {}\n", slug(params))
}
