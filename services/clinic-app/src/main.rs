use clinic_app::App;

fn main() {
    leptos::mount::mount_to_body(App);
}
