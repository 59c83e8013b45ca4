//! Browser entry point: mounts the application to the document body.

#[cfg(feature = "csr")]
fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(devblog_client::app::App);
}

#[cfg(not(feature = "csr"))]
fn main() {
    // The client only renders in the browser; native builds exist for tests.
}
