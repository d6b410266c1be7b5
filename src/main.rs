use anyhow::Context;
use clap::Parser;
use nail_studio::{cli, config, design_file, file_store, logging, tryon, view};
use nail_studio_common::{builtin_presets, quote, Wishlist};
use cli::{Cli, Commands, PlacementsAction, WishlistAction};
use config::Config;
use file_store::FileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = Config::load().context("設定ファイルを読み込めません")?;

    match cli.command {
        Commands::Align { photo, landmarks, width, height, nail_size, frame_out, output } => {
            println!("💅 nail-studio - 自動位置合わせ\n");

            let mut request = tryon::AlignRequest::new(&config, photo, landmarks);
            if let Some(w) = width {
                request.container.width = w;
            }
            if let Some(h) = height {
                request.container.height = h;
            }
            if let Some(size) = nail_size {
                request.nail = config::parse_size(&size)?;
            }
            request.frame_out = frame_out;

            let storage = FileStore::open(config.storage_file()?);
            let view = view::ConsoleView::new();
            let placements = tryon::align_photo(&config, &request, &storage, &view).await?;

            if let Some(output) = output {
                let json = serde_json::to_string_pretty(&placements)?;
                std::fs::write(&output, json)
                    .with_context(|| format!("書き込みに失敗: {}", output.display()))?;
                println!("✔ 配置を保存: {}", output.display());
            }
            println!("\n✅ {}本のネイルを配置", placements.len());
        }

        Commands::Price { design, preset, json } => {
            let design = design_file::resolve_design(design.as_deref(), preset.as_deref())?;
            let q = quote(&design);
            if json {
                println!("{}", serde_json::to_string_pretty(&q)?);
            } else {
                println!("{}", design_file::design_summary(&design));
                for line in design_file::quote_lines(&q) {
                    println!("{}", line);
                }
            }
        }

        Commands::Presets => {
            for preset in builtin_presets() {
                let design = preset.to_design();
                println!(
                    "  {:<16} {:<8} ${:<4} {}",
                    preset.name,
                    preset.vibe,
                    quote(&design).total,
                    design_file::design_summary(&design)
                );
            }
        }

        Commands::Wishlist { action } => {
            let wishlist = Wishlist::new(FileStore::open(config.storage_file()?));
            match action {
                WishlistAction::List => {
                    let entries = wishlist.load();
                    if entries.is_empty() {
                        println!("Your wishlist is empty.");
                    }
                    for line in design_file::wishlist_lines(&entries) {
                        println!("{}", line);
                    }
                }
                WishlistAction::Save { name, design, preset } => {
                    let design = design_file::resolve_design(design.as_deref(), preset.as_deref())?;
                    let entry = design_file::save_look(&wishlist, &name, &design)?;
                    println!("✔ Look saved to Wishlist: {} ({})", entry.name, entry.id);
                }
                WishlistAction::Remove { id } => {
                    if wishlist.remove(id)? {
                        println!("✔ Look removed");
                    } else {
                        println!("Look not found: {}", id);
                    }
                }
            }
        }

        Commands::Placements { action } => {
            let storage = FileStore::open(config.storage_file()?);
            match action {
                PlacementsAction::Show => {
                    let (shown, active) = tryon::show_placements(&storage);
                    if active.is_empty() {
                        println!("初期レイアウト:");
                    } else {
                        println!("保存済みの配置（{}本）:", active.len());
                    }
                    for row in view::placement_rows(&shown) {
                        println!("  {}", row);
                    }
                }
                PlacementsAction::Reset => {
                    let shown = tryon::reset_placements(&storage);
                    println!("✔ 初期レイアウトに戻しました");
                    for row in view::placement_rows(&shown) {
                        println!("  {}", row);
                    }
                }
            }
        }

        Commands::Config { show, init } => {
            if init {
                Config::default().save()?;
                println!("✔ 設定ファイルを作成: {}", Config::config_path()?.display());
            }

            if show || !init {
                println!("設定:");
                println!("  試着エリア: {}x{}px", config.container_width, config.container_height);
                println!("  ネイルサイズ: {}x{}px", config.nail_width, config.nail_height);
                println!("  位置合わせ: {}", serde_json::to_string(&config.align)?);
                println!("  保存先: {}", config.storage_file()?.display());
            }
        }
    }

    Ok(())
}
