use anyhow::Result;
use ludo_dal::{genero::Genero, plataforma::Plataforma};
use reqwest::Url;
use serde_json::json;
use tracing::info;

pub async fn create_genero(client: &reqwest::Client, base_url: &Url, nome: &str) -> Result<Genero> {
    let payload = json!({"nome": nome});
    let api_url = base_url.join("api/generos")?;

    let response = client.post(api_url).json(&payload).send().await?;
    info!("Genero Response: {:#?}", response);
    assert_eq!(201, response.status().as_u16());

    let new_genero: Genero = response.json().await?;
    Ok(new_genero)
}

pub async fn create_plataforma(
    client: &reqwest::Client,
    base_url: &Url,
    nome: &str,
) -> Result<Plataforma> {
    let payload = json!({"nome": nome});
    let api_url = base_url.join("api/plataformas")?;

    let response = client.post(api_url).json(&payload).send().await?;
    info!("Plataforma Response: {:#?}", response);
    assert_eq!(201, response.status().as_u16());

    let new_plataforma: Plataforma = response.json().await?;
    Ok(new_plataforma)
}
