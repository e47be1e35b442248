//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Default host the HTTP server binds to.
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default port for the HTTP server.
pub const DEFAULT_SERVER_PORT: u16 = 4001;

/// Default media root, relative to the working directory.
pub const DEFAULT_MEDIA_ROOT: &str = "media";

/// URL prefix under which the media root is served.
pub const FILES_ROUTE_PREFIX: &str = "/files/";

/// Environment variable naming the media root.
pub const MEDIA_ROOT_ENV_VAR: &str = "MEDIA_ROOT";

/// Environment variable naming the host to bind to.
pub const HOST_ENV_VAR: &str = "HOST";

/// Environment variable naming the port to bind to.
pub const PORT_ENV_VAR: &str = "PORT";

/// Environment variable naming the URL the service is reachable at.
pub const PUBLIC_BASE_URL_ENV_VAR: &str = "PUBLIC_BASE_URL";
