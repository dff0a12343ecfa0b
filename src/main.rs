use api::launch;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    launch().await?.launch().await?;
    Ok(())
}
