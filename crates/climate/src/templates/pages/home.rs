use maud::{html, Markup};

use crate::templates::layouts::{base, PageConfig};

/// Routes listed on the welcome page, with a short description each
const ROUTES: &[(&str, &str)] = &[
    ("/api/v1.0/precipitation", "precipitation by date, last 12 months of data"),
    ("/api/v1.0/stations", "all weather stations"),
    ("/api/v1.0/tobs", "temperature by date at the most active station, last 12 months of data"),
    ("/api/v1.0/{start}", "min / avg / max temperature from start through today"),
    ("/api/v1.0/{start}/{end}", "min / avg / max temperature from start through end"),
];

pub fn home_page(api_base: &str) -> Markup {
    let config = PageConfig {
        title: "Honolulu, Hawaii Climate API",
        api_base,
    };

    base(&config, content(api_base))
}

fn content(api_base: &str) -> Markup {
    html! {
        div class="content" {
            p { "Welcome to the Honolulu, Hawaii climate analysis API!" }
            p { "Dates are formatted as " code { "YYYY-MM-DD" } "." }
            h2 class="subtitle" { "Available Routes:" }
            ul {
                @for (path, description) in ROUTES {
                    li {
                        @if path.contains('{') {
                            code { (path) }
                        } @else {
                            a href=(format!("{}{}", api_base, path)) { code { (path) } }
                        }
                        " - " (description)
                    }
                }
            }
        }
    }
}
