//! Interactive downloader for OpenEdX course videos
//!
//! Thin driver around `edx-core`: parses arguments, prompts for
//! credentials, lets the user pick a course and its sections, then hands
//! every extracted video URL to an external `youtube-dl` process and
//! optionally writes converted subtitles next to the downloaded files.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use edx_core::{Course, CourseState, EdxScraper, KNOWN_PLATFORMS, Platform, Section};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "edx-dl", version, about = "Download videos from OpenEdX platforms")]
struct Args {
    /// OpenEdX platform to target
    #[arg(short = 'x', long, default_value = "edx")]
    platform: String,

    /// Account email
    #[arg(short, long)]
    username: Option<String>,

    /// Account password (prompted for when omitted)
    #[arg(short, long)]
    password: Option<String>,

    /// youtube-dl format code for the downloaded videos
    #[arg(short, long)]
    format: Option<String>,

    /// Download subtitles alongside the videos
    #[arg(short = 's', long)]
    subtitles: bool,

    /// Directory to store downloads in
    #[arg(short, long, default_value = "Downloaded")]
    output_dir: PathBuf,

    /// List enrolled courses without downloading
    #[arg(short, long)]
    list: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("\n{} {}", "[X]".red(), e.to_string().red());
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    let result = fern::Dispatch::new()
        .level(level)
        .format(|out, message, record| {
            out.finish(format_args!("[{:<5}] [{}] {}", record.level(), record.target(), message))
        })
        .chain(io::stderr())
        .apply();

    if let Err(e) = result {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }
}

async fn run(args: Args) -> Result<()> {
    let Some(platform) = Platform::from_name(&args.platform) else {
        bail!(
            "OpenEdX platform should be one of: {}",
            KNOWN_PLATFORMS.join(", ")
        );
    };

    let username = match args.username.clone() {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    let password = match args.password.clone() {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ").context("failed to read password")?,
    };
    if username.is_empty() || password.is_empty() {
        bail!("You must supply username AND password to log in");
    }

    let mut scraper = EdxScraper::new(platform)?;
    scraper.login(&username, &password).await?;

    let courses = scraper.courses().await?;
    display_courses(&courses);
    if args.list {
        return Ok(());
    }

    let course = select_course(&mut io::stdin().lock(), &courses)?;
    let sections = scraper.sections(course).await?;
    display_sections(&course.name, &sections);
    let selected = select_sections(&mut io::stdin().lock(), &sections)?;

    let urls: Vec<String> = selected.iter().map(|s| s.url.clone()).collect();
    let (video_urls, sub_urls) = scraper.extract_all(&urls).await?;
    if video_urls.is_empty() {
        println!("{}", "WARNING: No downloadable video found.".yellow());
        return Ok(());
    }

    let course_dir = directory_name(&course.name);
    let target_dir = args.output_dir.join(course_dir);
    fs::create_dir_all(&target_dir)
        .with_context(|| format!("failed to create {}", target_dir.display()))?;
    println!("[info] Output directory: {}", target_dir.display());

    let format_option = match &args.format {
        Some(f) => format!("{}/mp4", f),
        None => "mp4".to_string(),
    };

    for (i, (video_url, sub_url)) in video_urls.iter().zip(&sub_urls).enumerate() {
        let prefix = format!("{:02}", i + 1);
        download_video(&target_dir, &prefix, video_url, &format_option, args.subtitles)?;

        if args.subtitles
            && let Some(sub_url) = sub_url
        {
            write_subtitles(&scraper, &target_dir, &prefix, sub_url).await?;
        }
    }

    Ok(())
}

fn display_courses(courses: &[Course]) {
    println!("You can access {} courses", courses.len());
    for (i, course) in courses.iter().enumerate() {
        let state = match course.state {
            CourseState::Started => "Started",
            CourseState::NotStarted => "Not yet",
        };
        println!("{} - [{}] - {}", i + 1, state, course.name);
    }
}

fn display_sections(course_name: &str, sections: &[Section]) {
    println!("{} has {} sections so far", course_name, sections.len());
    for section in sections {
        println!("{} - Download {} videos", section.position, section.name);
    }
    println!("{} - Download them all", sections.len() + 1);
}

/// Ask for a course number until a started course is picked
fn select_course<'a>(reader: &mut impl BufRead, courses: &'a [Course]) -> Result<&'a Course> {
    loop {
        let input = read_input(reader, "Enter Course Number: ")?;
        let Ok(number) = input.parse::<usize>() else {
            println!("Enter a valid number between 1 and {}", courses.len());
            continue;
        };
        if number < 1 || number > courses.len() {
            println!("Enter a valid number between 1 and {}", courses.len());
            continue;
        }
        let course = &courses[number - 1];
        if course.state != CourseState::Started {
            println!("The course has not started!");
            continue;
        }
        return Ok(course);
    }
}

/// Ask for a section number; one past the end selects all sections
fn select_sections<'a>(
    reader: &mut impl BufRead,
    sections: &'a [Section],
) -> Result<Vec<&'a Section>> {
    loop {
        let input = read_input(reader, "Enter Your Choice: ")?;
        let Ok(number) = input.parse::<usize>() else {
            println!("Enter a valid number between 1 and {}", sections.len() + 1);
            continue;
        };
        if number < 1 || number > sections.len() + 1 {
            println!("Enter a valid number between 1 and {}", sections.len() + 1);
            continue;
        }
        if number == sections.len() + 1 {
            return Ok(sections.iter().collect());
        }
        return Ok(vec![&sections[number - 1]]);
    }
}

fn prompt(message: &str) -> Result<String> {
    read_input(&mut io::stdin().lock(), message)
}

/// Print a prompt and read one line, treating end of input as an error
/// so closed stdin cannot spin the selection loops forever
fn read_input(reader: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush().context("failed to flush stdout")?;

    let mut input = String::new();
    let bytes = reader.read_line(&mut input).context("failed to read input")?;
    if bytes == 0 {
        bail!("input closed before a choice was made");
    }
    Ok(input.trim().to_string())
}

/// Keep only filesystem-friendly characters from a course name
fn directory_name(initial_name: &str) -> String {
    let name: String = initial_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '.'))
        .collect();
    if name.is_empty() { "course_folder".to_string() } else { name }
}

fn download_video(
    target_dir: &Path,
    prefix: &str,
    video_url: &str,
    format_option: &str,
    subtitles: bool,
) -> Result<()> {
    let template = target_dir.join(format!("{}-%(title)s.%(ext)s", prefix));

    let mut cmd = Command::new("youtube-dl");
    cmd.arg("-o").arg(&template).arg("-f").arg(format_option);
    if subtitles {
        cmd.arg("--write-sub");
    }
    cmd.arg(video_url);

    log::debug!("Running {:?}", cmd);
    let status = cmd.status().context("failed to run youtube-dl (is it installed?)")?;
    if !status.success() {
        log::warn!("youtube-dl exited with {} for {}", status, video_url);
    }
    Ok(())
}

async fn write_subtitles(
    scraper: &EdxScraper,
    target_dir: &Path,
    prefix: &str,
    sub_url: &str,
) -> Result<()> {
    let Some(basename) = find_downloaded_basename(target_dir, prefix) else {
        println!("{}", format!("[warning] no video downloaded for {}", prefix).yellow());
        return Ok(());
    };

    let subs_path = target_dir.join(format!("{}.srt", basename));
    if subs_path.exists() {
        return Ok(());
    }

    if let Some(srt) = scraper.subtitle(sub_url).await {
        println!("[info] Writing subtitles: {}", subs_path.display());
        fs::write(&subs_path, srt)
            .with_context(|| format!("failed to write {}", subs_path.display()))?;
    }
    Ok(())
}

/// Find the basename of the file youtube-dl produced for this prefix
fn find_downloaded_basename(target_dir: &Path, prefix: &str) -> Option<String> {
    let entries = fs::read_dir(target_dir).ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with(prefix) && !name.ends_with(".srt") {
            let basename = name.rsplit_once('.').map(|(stem, _)| stem.to_string());
            return basename.or(Some(name));
        }
    }
    None
}
