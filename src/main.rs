use dotenv::dotenv;
use std::env;

use wayline::api::serve;
use wayline::db;
use wayline::engine::Engine;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:wayline.db".into());

    let pool = db::connect(&db_url, 5).await.unwrap();

    let engine = Engine::new(pool).await.unwrap();

    serve(engine).await;
}
