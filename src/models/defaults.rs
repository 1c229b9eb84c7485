pub fn default_http_port() -> u16 {
    7800
}
