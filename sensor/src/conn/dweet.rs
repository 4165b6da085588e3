pub const DEFAULT_HOST: &str = "dweet.io";
pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_THING: &str = "esp32-software-only-demo";

/// Request path for posting one temperature under `thing`
pub fn dweet_path(thing: &str, temperature: i32) -> String {
    format!(
        "/dweet/for/{}?temperature={}",
        urlencoding::encode(thing),
        temperature
    )
}
