use vendora_backend_rs::app::App;

#[tokio::main]
async fn main() {
    let app = App::new().await;

    app.serve().await;
}
