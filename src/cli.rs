use crate::state::AppState;
use anyhow::{bail, Context};
use application::catalog::{CatalogError, SearchField};
use application::context::AppContext;
use application::query::classical::GetClassicalWorks;
use application::query::manga::{GetFavoriteMangas, GetTopMangas, SearchMangas};
use application::query::music::{GetFavoriteTracks, GetTopTracks, SearchTracks};
use application::reconcile::Reconciled;
use clap::{Parser, Subcommand};
use domain::value::{ArtistId, MalId, TrackId, WorkId};
use model::catalog::{CatalogManga, CatalogTrack};
use model::flagged::Flagged;

/// Top pages looked through when a manga to favorite is not found by search.
const MANGA_LOOKUP_PAGES: u32 = 5;

#[derive(Debug, Parser)]
#[command(name = "hobbyhub", version, about = "Favorites for music, classical works and manga")]
pub struct Cli {
    /// Read this config file instead of ./config.* and APP__* variables
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(subcommand)]
    Music(MusicCommand),
    #[command(subcommand)]
    Classical(ClassicalCommand),
    #[command(subcommand)]
    Manga(MangaCommand),
}

#[derive(Debug, Subcommand)]
pub enum MusicCommand {
    /// Current chart, favorites marked with *
    Chart,
    Search {
        query: String,
        #[arg(long, default_value = "track")]
        field: SearchField,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Favorite the track, or remove it when it already is one
    Favorite { track_id: i64 },
    Favorites,
    Remove { track_id: i64 },
    /// Delete the artist together with its albums and favorite tracks
    DeleteArtist { artist_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ClassicalCommand {
    /// Rated works first, then a random selection from the catalog
    Works,
    Rate { work_id: i64, rating: i32 },
}

#[derive(Debug, Subcommand)]
pub enum MangaCommand {
    Top {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Favorite the manga, or remove it when it already is one
    Favorite {
        mal_id: i64,
        /// Search for the manga instead of looking through the top list
        #[arg(long)]
        query: Option<String>,
    },
    Favorites,
    Remove { mal_id: i64 },
}

pub async fn run(state: &AppState, command: Command) -> anyhow::Result<()> {
    let ctx = AppContext::new();
    match command {
        Command::Music(cmd) => run_music(state, &ctx, cmd).await,
        Command::Classical(cmd) => run_classical(state, &ctx, cmd).await,
        Command::Manga(cmd) => run_manga(state, &ctx, cmd).await,
    }
}

async fn run_music(state: &AppState, ctx: &AppContext, cmd: MusicCommand) -> anyhow::Result<()> {
    match cmd {
        MusicCommand::Chart => {
            let result = GetTopTracks::new(state.music_catalog.clone(), state.repos.track.clone())
                .handle()
                .await?;
            print_tracks(&result);
        }
        MusicCommand::Search { query, field, page } => {
            let result = SearchTracks::new(state.music_catalog.clone(), state.repos.track.clone())
                .handle(&query, field, page)
                .await?;
            print_tracks(&result);
        }
        MusicCommand::Favorite { track_id } => {
            let id = TrackId::from(track_id);
            // removing needs nothing from the catalog
            if state.tracks.remove_favorite(ctx, id).await? {
                println!("Removed track {} from favorites", track_id);
                return Ok(());
            }
            let track = state
                .music_catalog
                .track(id)
                .await
                .with_context(|| format!("could not load track {}", track_id))?;
            let outcome = state.tracks.toggle_favorite(ctx, &track).await?;
            let verb = if outcome.favorited { "Added" } else { "Removed" };
            println!(
                "{} {} - {}, {} favorites",
                verb,
                track.artist.name,
                track.title,
                outcome.favorites.len()
            );
        }
        MusicCommand::Favorites => {
            let favorites = GetFavoriteTracks::new(state.repos.favorite_track_dao.clone())
                .handle()
                .await?;
            for f in &favorites {
                println!("{:>12}  {} - {} [{}]", f.track_id, f.artist_name, f.title, f.album_title);
            }
            println!("{} favorite tracks", favorites.len());
        }
        MusicCommand::Remove { track_id } => {
            if state.tracks.remove_favorite(ctx, TrackId::from(track_id)).await? {
                println!("Removed track {} from favorites", track_id);
            } else {
                println!("Track {} is not a favorite", track_id);
            }
        }
        MusicCommand::DeleteArtist { artist_id } => {
            let removed = state.tracks.delete_artist(ctx, ArtistId::from(artist_id)).await?;
            println!("Deleted artist {} and {} favorite tracks", artist_id, removed.len());
        }
    }
    Ok(())
}

async fn run_classical(
    state: &AppState,
    ctx: &AppContext,
    cmd: ClassicalCommand,
) -> anyhow::Result<()> {
    match cmd {
        ClassicalCommand::Works => {
            let result = GetClassicalWorks::new(
                state.classical_catalog.clone(),
                state.repos.classical_work.clone(),
            )
            .handle()
            .await?;
            // shown works can be rated by id afterwards
            state.works.remember(&result.items).await?;
            report_degraded(&result);
            for w in &result.items {
                let stars = if w.rating > 0 { "*".repeat(w.rating as usize) } else { "-".to_string() };
                println!("{:>8}  {:<5}  {} ({})", w.id.as_i64(), stars, w.title, w.composer_name);
            }
        }
        ClassicalCommand::Rate { work_id, rating } => {
            let work = state.works.rate_known(ctx, WorkId::from(work_id), rating).await?;
            println!("Rated {} by {}: {}", work.title, work.composer_name, work.rating);
        }
    }
    Ok(())
}

async fn run_manga(state: &AppState, ctx: &AppContext, cmd: MangaCommand) -> anyhow::Result<()> {
    match cmd {
        MangaCommand::Top { page } => {
            let result = GetTopMangas::new(state.manga_catalog.clone(), state.repos.manga.clone())
                .handle(page)
                .await?;
            print_mangas(&result);
        }
        MangaCommand::Search { query, page } => {
            let result = SearchMangas::new(state.manga_catalog.clone(), state.repos.manga.clone())
                .handle(&query, page)
                .await?;
            print_mangas(&result);
        }
        MangaCommand::Favorite { mal_id, query } => {
            if state.mangas.remove_favorite(ctx, MalId::from(mal_id)).await? {
                println!("Removed manga {} from favorites", mal_id);
                return Ok(());
            }
            let manga = find_manga(state, mal_id, query.as_deref()).await?;
            let outcome = state.mangas.toggle_favorite(ctx, &manga).await?;
            let verb = if outcome.favorited { "Added" } else { "Removed" };
            println!("{} {}, {} favorites", verb, manga.title, outcome.favorites.len());
        }
        MangaCommand::Favorites => {
            let favorites = GetFavoriteMangas::new(state.repos.manga.clone()).handle().await?;
            for m in &favorites {
                println!("{:>8}  {}", m.mal_id.as_i64(), m.title);
            }
            println!("{} favorite mangas", favorites.len());
        }
        MangaCommand::Remove { mal_id } => {
            if state.mangas.remove_favorite(ctx, MalId::from(mal_id)).await? {
                println!("Removed manga {} from favorites", mal_id);
            } else {
                println!("Manga {} is not a favorite", mal_id);
            }
        }
    }
    Ok(())
}

async fn find_manga(
    state: &AppState,
    mal_id: i64,
    query: Option<&str>,
) -> anyhow::Result<CatalogManga> {
    let matches = |items: Vec<CatalogManga>| items.into_iter().find(|m| m.mal_id == mal_id);
    if let Some(query) = query {
        let found = state.manga_catalog.search_mangas(query, 1).await?;
        if let Some(manga) = matches(found) {
            return Ok(manga);
        }
    }
    for page in 1..=MANGA_LOOKUP_PAGES {
        let top = state.manga_catalog.top_mangas(page).await?;
        if top.is_empty() {
            break;
        }
        if let Some(manga) = matches(top) {
            return Ok(manga);
        }
    }
    bail!("manga {} not found in the catalog results", mal_id)
}

fn report_degraded<T>(result: &Reconciled<T>) {
    if let Some(e) = &result.remote_error {
        eprintln!("{}", degraded_message(e));
    }
}

fn degraded_message(e: &CatalogError) -> String {
    format!("Catalog unavailable, showing saved items only ({})", e)
}

fn print_tracks(result: &Reconciled<Flagged<CatalogTrack>>) {
    report_degraded(result);
    for f in &result.items {
        let mark = if f.is_favorite { "*" } else { " " };
        println!(
            "{} {:>12}  {} - {} [{}]",
            mark, f.item.id, f.item.artist.name, f.item.title, f.item.album.title
        );
    }
    if let Some(next) = result.next_page {
        println!("more: --page {}", next);
    }
}

fn print_mangas(result: &Reconciled<Flagged<CatalogManga>>) {
    report_degraded(result);
    for f in &result.items {
        let mark = if f.is_favorite { "*" } else { " " };
        let score = f.item.score.map(|s| format!("{:.2}", s)).unwrap_or_default();
        println!("{} {:>8}  {:<5}  {}", mark, f.item.mal_id, score, f.item.title);
    }
    if let Some(next) = result.next_page {
        println!("more: --page {}", next);
    }
}
