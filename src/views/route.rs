use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when an id is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Navigation targets the views can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    ProjectDetail(String),
    Login,
    NotFound(String),
}

impl Route {
    /// Resolves a location path. Query string and fragment are ignored.
    pub fn parse(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["project", id] => {
                Route::ProjectDetail(percent_decode_str(id).decode_utf8_lossy().into_owned())
            }
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::ProjectDetail(id) => format!("/project/{}", utf8_percent_encode(id, SEGMENT)),
            Route::Login => "/login".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }
}
