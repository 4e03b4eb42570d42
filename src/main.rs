#[tokio::main]
async fn main() {
    if let Err(e) = todolist_lib::run().await {
        eprintln!("[todolist] {}", e);
        std::process::exit(1);
    }
}
