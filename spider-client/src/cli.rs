//! Command-line surface of `spiderctl`.

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use spider_client::format::{format_bytes, format_duration, format_number, format_timestamp};
use spider_client::{Gateway, SearchOptions, SpiderUserOptions};
use spider_common::{
    ApiError, AppConfigUpdate, Envelope, ScannerConfigUpdate, SpiderTask, SubscriptionUpdate,
    WorkInfo,
};

#[derive(Parser)]
#[command(
    name = "spiderctl",
    about = "Drive the spider backend: crawl users, works and searches, manage subscriptions",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Backend base URL (overrides config)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show backend status
    Status,
    /// Validate a cookie with the backend and keep it for later calls
    Login { cookie: String },
    /// Crawl every work of a user
    User {
        user_url: String,
        #[arg(long)]
        save_choice: Option<String>,
        #[arg(long)]
        force: bool,
        /// Only crawl these work ids
        #[arg(long = "select")]
        selected: Vec<String>,
    },
    /// Search users by keyword
    SearchUsers {
        query: String,
        #[arg(long)]
        num: Option<u32>,
    },
    /// List a user's works without downloading
    UserVideos { user_url: String },
    /// Fetch a single work
    Work {
        work_url: String,
        #[arg(long)]
        download: bool,
    },
    /// Crawl a list of work URLs
    Batch {
        #[arg(required = true)]
        work_urls: Vec<String>,
        #[arg(long)]
        force: bool,
    },
    /// Crawl the results of a search
    Search(SearchArgs),
    /// List downloaded works
    Works {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List authors of downloaded works
    Authors,
    /// List tasks
    Tasks,
    /// Show one task
    Task { task_id: String },
    /// Cancel a task
    Cancel { task_id: String },
    /// Backend configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Subscriptions
    #[command(subcommand)]
    Subs(SubsCommand),
    /// Subscription scanner
    #[command(subcommand)]
    Scanner(ScannerCommand),
    /// GET an arbitrary endpoint and print the raw envelope
    Get { endpoint: String },
    /// POST a JSON body to an arbitrary endpoint
    Post { endpoint: String, body: String },
    /// PUT a JSON body to an arbitrary endpoint
    Put { endpoint: String, body: String },
}

#[derive(Args)]
pub struct SearchArgs {
    query: String,
    /// Number of works to fetch
    #[arg(long)]
    count: Option<u32>,
    #[arg(long)]
    sort_type: Option<String>,
    #[arg(long)]
    publish_time: Option<String>,
    #[arg(long)]
    filter_duration: Option<String>,
    #[arg(long)]
    search_range: Option<String>,
    #[arg(long)]
    content_type: Option<String>,
    #[arg(long)]
    save_choice: Option<String>,
    #[arg(long)]
    force: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,
    Set {
        #[arg(long)]
        save_path: Option<String>,
        #[arg(long)]
        cookie: Option<String>,
        #[arg(long)]
        proxy: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SubsCommand {
    List,
    /// Subscribe to the best match for a user search
    Add { query: String },
    Remove { user_id: String },
    Update {
        user_id: String,
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        auto_download: Option<bool>,
        #[arg(long = "select")]
        selected: Vec<String>,
    },
    /// Check every subscription for new works
    Check,
    Videos {
        user_id: String,
        #[arg(long)]
        only_new: bool,
    },
    DownloadNew { user_id: String },
}

#[derive(Subcommand)]
pub enum ScannerCommand {
    Show,
    Set {
        #[arg(long)]
        interval: Option<u64>,
        #[arg(long)]
        auto_download: Option<bool>,
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        batch_size: Option<u32>,
    },
    Start,
    Stop,
}

/// Run one command to completion.
pub async fn run(command: Command, gateway: &Gateway) -> Result<(), ApiError> {
    match command {
        Command::Status => {
            let status = gateway.system_status().await?.data;
            println!("running:      {}", status.is_running);
            println!("cookie valid: {}", status.cookie_valid);
            println!("works:        {}", format_number(status.total_works));
            println!("users:        {}", format_number(status.total_users));
            println!(
                "disk:         {} / {}",
                format_bytes(status.disk_usage.used),
                format_bytes(status.disk_usage.total)
            );
        }

        Command::Login { cookie } => {
            let valid = gateway.validate_cookie(&cookie).await?.data;
            if !valid {
                return Err(ApiError::new(0, "Cookie rejected by backend", 0));
            }
            gateway.set_token(cookie).await;
            println!("Cookie saved");
        }

        Command::User {
            user_url,
            save_choice,
            force,
            selected,
        } => {
            let options = SpiderUserOptions {
                save_choice,
                force_download: force,
                selected_videos: non_empty(selected),
            };
            print_task(&gateway.spider_user(&user_url, options).await?.data);
        }

        Command::SearchUsers { query, num } => {
            for user in gateway.search_users(&query, num).await?.data {
                println!(
                    "{:<20} {:<24} {:>8} followers  {:>5} works",
                    user.user_id,
                    user.nickname,
                    format_number(user.follower_count),
                    user.aweme_count
                );
            }
        }

        Command::UserVideos { user_url } => {
            let response = gateway.user_videos(&user_url).await?.data;
            println!("{} ({} works)", response.user.nickname, response.user.aweme_count);
            for video in response.works {
                let kind = if video.is_image_gallery() { "images" } else { "video" };
                println!(
                    "{:<20} {:<6} {:>8}  {}",
                    video.aweme_id,
                    kind,
                    format_duration(video.duration),
                    video.desc
                );
            }
        }

        Command::Work { work_url, download } => {
            print_work(&gateway.spider_work(&work_url, download).await?.data);
        }

        Command::Batch { work_urls, force } => {
            print_task(&gateway.spider_batch_works(&work_urls, force).await?.data);
        }

        Command::Search(args) => {
            let options = SearchOptions {
                require_num: args.count,
                sort_type: args.sort_type,
                publish_time: args.publish_time,
                filter_duration: args.filter_duration,
                search_range: args.search_range,
                content_type: args.content_type,
                save_choice: args.save_choice,
                force_download: args.force,
            };
            print_task(&gateway.spider_search(&args.query, options).await?.data);
        }

        Command::Works { page, limit } => {
            let page = gateway.works(page, limit).await?.data;
            println!("page {} ({} per page, {} total)", page.page, page.limit, page.total);
            for work in &page.items {
                print_work(work);
            }
        }

        Command::Authors => {
            for author in gateway.work_authors().await?.data {
                println!("{:<20} {}", author.user_id, author.nickname);
            }
        }

        Command::Tasks => {
            for task in gateway.tasks().await?.data {
                print_task(&task);
            }
        }

        Command::Task { task_id } => {
            let task = gateway.task(&task_id).await?.data;
            print_task(&task);
            for item in task.results.iter().flatten() {
                match &item.error {
                    Some(error) => println!("  {:?} {} ({})", item.status, item.url, error),
                    None => println!("  {:?} {}", item.status, item.url),
                }
            }
        }

        Command::Cancel { task_id } => {
            print_message(gateway.cancel_task(&task_id).await?);
        }

        Command::Config(ConfigCommand::Show) => {
            let config = gateway.app_config().await?.data;
            println!("save_path: {}", config.save_path);
            println!("cookie:    {}", if config.cookie.is_empty() { "(unset)" } else { "(set)" });
            println!("proxy:     {}", config.proxy.as_deref().unwrap_or("(none)"));
        }

        Command::Config(ConfigCommand::Set {
            save_path,
            cookie,
            proxy,
        }) => {
            let update = AppConfigUpdate {
                save_path,
                cookie,
                proxy,
            };
            print_message(gateway.update_app_config(&update).await?);
        }

        Command::Subs(command) => run_subs(command, gateway).await?,

        Command::Scanner(command) => run_scanner(command, gateway).await?,

        Command::Get { endpoint } => {
            print_raw(gateway.get::<Value>(&endpoint).await?);
        }

        Command::Post { endpoint, body } => {
            let body = parse_body(&body)?;
            print_raw(gateway.post::<Value, _>(&endpoint, &body).await?);
        }

        Command::Put { endpoint, body } => {
            let body = parse_body(&body)?;
            print_raw(gateway.put::<Value, _>(&endpoint, &body).await?);
        }
    }

    Ok(())
}

async fn run_subs(command: SubsCommand, gateway: &Gateway) -> Result<(), ApiError> {
    match command {
        SubsCommand::List => {
            let list = gateway.subscriptions().await?.data;
            for sub in &list.subscriptions {
                println!(
                    "{:<20} {:<24} enabled={:<5} auto={:<5} last_check={}",
                    sub.user_id,
                    sub.nickname,
                    sub.enabled,
                    sub.auto_download,
                    sub.last_check_time.as_deref().unwrap_or("never")
                );
            }
            let stats = &list.stats;
            println!(
                "{} subscriptions ({} enabled), {} videos, {} downloaded, {} new",
                stats.total_subscriptions,
                stats.enabled_subscriptions,
                stats.total_videos,
                stats.downloaded_videos,
                stats.new_videos
            );
        }

        SubsCommand::Add { query } => {
            let users = gateway.search_users(&query, None).await?.data;
            let user = users
                .into_iter()
                .next()
                .ok_or_else(|| ApiError::new(0, format!("No user found for '{}'", query), 0))?;
            let created = gateway.add_subscription(&user).await?.data;
            println!(
                "Subscribed to {} ({}) as #{}",
                user.nickname, user.user_id, created.subscription_id
            );
        }

        SubsCommand::Remove { user_id } => {
            print_message(gateway.remove_subscription(&user_id).await?);
        }

        SubsCommand::Update {
            user_id,
            enabled,
            auto_download,
            selected,
        } => {
            let update = SubscriptionUpdate {
                enabled,
                auto_download,
                selected_videos: non_empty(selected),
            };
            if update.is_empty() {
                println!("Nothing to update");
                return Ok(());
            }
            print_message(gateway.update_subscription(&user_id, &update).await?);
        }

        SubsCommand::Check => {
            print_task(&gateway.check_subscription_updates().await?.data);
        }

        SubsCommand::Videos { user_id, only_new } => {
            let videos = gateway.subscription_videos(&user_id, only_new).await?.data;
            for video in &videos.videos {
                println!(
                    "{:<20} {:>8} {:<10} {}",
                    video.aweme_id,
                    format_duration(video.duration),
                    if video.is_downloaded { "downloaded" } else { "new" },
                    video.title
                );
            }
            println!("{} not yet downloaded", videos.pending().count());
        }

        SubsCommand::DownloadNew { user_id } => {
            let envelope = gateway.download_subscription_new_videos(&user_id).await?;
            match &envelope.data {
                Some(task) => print_task(task),
                None => println!("{}", envelope.message),
            }
        }
    }

    Ok(())
}

async fn run_scanner(command: ScannerCommand, gateway: &Gateway) -> Result<(), ApiError> {
    match command {
        ScannerCommand::Show => {
            let config = gateway.scanner_config().await?.data;
            println!("enabled:       {}", config.enabled);
            println!("running:       {}", config.is_running);
            println!("interval:      {}", format_duration(config.interval));
            println!("auto download: {}", config.auto_download);
            if let Some(batch_size) = config.batch_size {
                println!("batch size:    {}", batch_size);
            }
        }
        ScannerCommand::Set {
            interval,
            auto_download,
            enabled,
            batch_size,
        } => {
            let update = ScannerConfigUpdate {
                interval,
                auto_download,
                enabled,
                batch_size,
            };
            print_message(gateway.update_scanner_config(&update).await?);
        }
        ScannerCommand::Start => print_message(gateway.start_scanner().await?),
        ScannerCommand::Stop => print_message(gateway.stop_scanner().await?),
    }

    Ok(())
}

fn print_task(task: &SpiderTask) {
    let target = task
        .query
        .as_deref()
        .or(task.url.as_deref())
        .unwrap_or_default();
    println!(
        "{}  {:<11} {:<9} {}/{} ({:.0}%)  {}  {}",
        task.id,
        task.kind.to_string(),
        task.status.to_string(),
        task.progress,
        task.total,
        task.fraction() * 100.0,
        format_timestamp(task.created_at as i64),
        target
    );
    if let Some(error) = &task.error {
        println!("  error: {}", error);
    }
}

fn print_work(work: &WorkInfo) {
    let size = work.file_size.map(format_bytes).unwrap_or_default();
    println!(
        "{:<20} {:<6} {:<16} {:>8} likes {:>8}  {}",
        work.work_id,
        work.work_type,
        work.author.nickname,
        format_number(work.statistics.digg_count),
        size,
        work.title
    );
}

fn print_message<T>(envelope: Envelope<T>) {
    println!("{}", envelope.message);
}

fn print_raw(envelope: Envelope<Value>) {
    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to render response: {}", e),
    }
}

fn parse_body(body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::new(0, format!("Invalid JSON body: {}", e), 0))
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
