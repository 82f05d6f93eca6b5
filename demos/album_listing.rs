/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

extern crate fotki;

use anyhow::Result;
use dotenvy::dotenv;
use fotki::models::AlbumList;
use fotki::protocol::{Client, Config, ServiceRegistry};
use std::fs;
use std::path::PathBuf;

// Lists every album and its photos, optionally downloading the newest photo
// of each album into the directory given as first argument.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let download_dir = std::env::args().nth(1).map(PathBuf::from);
    if let Some(dir) = &download_dir {
        fs::create_dir_all(dir)?;
    }

    // FOTKI_OAUTH_TOKEN is required; FOTKI_SERVICE_URL and FOTKI_TIMEOUT_SECS are optional
    let config = Config::from_env()?;
    anyhow::ensure!(config.creds.is_some(), "FOTKI_OAUTH_TOKEN is not set");
    let registry = ServiceRegistry::new(Client::from_config(&config)?);

    let Some(mut album_list) = AlbumList::from_service_url(&registry, &config.service_url).await?
    else {
        println!("No album list found at {}", config.service_url);
        return Ok(());
    };

    for mut album in album_list.albums().await? {
        println!(
            "{} photos: {} updated: {:?}",
            album,
            album.image_count().unwrap_or_default(),
            album.updated()
        );

        let photos = album.photos().await?;
        for photo in &photos {
            println!("    {} ({} bytes)", photo, photo.size().unwrap_or_default());
        }

        if let (Some(dir), Some(newest)) = (&download_dir, photos.first()) {
            if let Some(image) = newest.image().await? {
                let file_name = format!("{}.jpg", newest.title().unwrap_or("untitled").replace('/', "_"));
                fs::write(dir.join(&file_name), &image)?;
                println!("    saved {}", file_name);
            }
        }
    }

    Ok(())
}
