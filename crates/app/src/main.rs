use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::{ApiConfig, HttpBackend, InMemoryBackend, LessonRepository};
use lesson_core::model::{
    DialogueLine, Exercise, ExerciseId, LessonDetail, LessonId, LessonOverview, LessonText, Level,
    Locale, VocabWord, WordId,
};
use services::{
    Clock, CommandSynthesizer, PracticeLoopService, QuizLoopService, SpeechService, Synthesizer,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidLocale { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidLocale { raw } => {
                write!(f, "invalid --locale value: {raw} (expected en, bn, or de)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_locale(raw: &str) -> Result<Locale, ArgsError> {
    match raw.to_ascii_lowercase().as_str() {
        "en" => Ok(Locale::En),
        "bn" => Ok(Locale::Bn),
        "de" => Ok(Locale::De),
        _ => Err(ArgsError::InvalidLocale {
            raw: raw.to_string(),
        }),
    }
}

struct DesktopApp {
    locale: Locale,
    lessons: Arc<dyn LessonRepository>,
    quiz_loop: Arc<QuizLoopService>,
    practice_loop: Arc<PracticeLoopService>,
    speech: SpeechService,
}

impl UiApp for DesktopApp {
    fn locale(&self) -> Locale {
        self.locale
    }

    fn lessons(&self) -> Arc<dyn LessonRepository> {
        Arc::clone(&self.lessons)
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn practice_loop(&self) -> Arc<PracticeLoopService> {
        Arc::clone(&self.practice_loop)
    }

    fn speech(&self) -> SpeechService {
        self.speech.clone()
    }
}

struct Args {
    api_url: Option<String>,
    locale: Locale,
    offline: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <url>] [--locale <en|bn|de>] [--offline]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api http://localhost:5000/api");
    eprintln!("  --locale en");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DEUTSCH_API_URL, DEUTSCH_LOCALE");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url = None;
        let mut locale = std::env::var("DEUTSCH_LOCALE")
            .ok()
            .as_deref()
            .map(parse_locale)
            .transpose()?
            .unwrap_or(Locale::En);
        let mut offline = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    api_url = Some(require_value(args, "--api")?);
                }
                "--locale" => {
                    let value = require_value(args, "--locale")?;
                    locale = parse_locale(&value)?;
                }
                "--offline" => {
                    offline = true;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api_url,
            locale,
            offline,
        })
    }
}

/// A small built-in lesson so `--offline` starts with something to click.
fn seed_offline_backend() -> Result<Arc<InMemoryBackend>, lesson_core::Error> {
    let backend = InMemoryBackend::new();
    let lesson_id = LessonId::new("demo-greetings");

    backend.insert_lesson(LessonDetail::new(
        LessonOverview::new(
            lesson_id.clone(),
            LessonText::plain("Greetings"),
            LessonText::plain("Say hello and introduce yourself."),
            Some(Level::A1),
        ),
        vec![
            "Wie begrüßt man sich in Deutschland?".to_string(),
            "Think of three situations where you would say \"Hallo\".".to_string(),
        ],
        vec![
            "\"Guten Tag\" is the safe greeting for strangers; \"Hallo\" is informal."
                .to_string(),
        ],
        DialogueLine::assign_sides(vec![
            ("Anna".to_string(), "Hallo! Wie heißt du?".to_string()),
            ("Ben".to_string(), "Ich heiße Ben. Und du?".to_string()),
            ("Anna".to_string(), "Ich bin Anna. Freut mich!".to_string()),
        ]),
    ));

    let words = vec![
        word("w1", "Hallo", "hello")?,
        word("w2", "Guten Tag", "good day")?,
        word("w3", "Tschüss", "bye")?,
        word("w4", "Danke", "thank you")?,
        word("w5", "Bitte", "please / you're welcome")?,
    ];
    backend.set_words(lesson_id.clone(), words.clone());
    backend.set_word_pool(words);

    backend.set_exercises(
        lesson_id,
        vec![
            exercise(
                "e1",
                "How do you greet a stranger during the day?",
                &["Guten Tag", "Tschüss", "Bitte"],
                "Guten Tag",
            )?,
            exercise(
                "e2",
                "What does \"Danke\" mean?",
                &["please", "thank you", "bye"],
                "thank you",
            )?,
            exercise(
                "e3",
                "Which word says goodbye?",
                &["Hallo", "Tschüss", "Danke"],
                "Tschüss",
            )?,
        ],
    );

    Ok(Arc::new(backend))
}

fn word(id: &str, german: &str, english: &str) -> Result<VocabWord, lesson_core::Error> {
    let word = VocabWord::new(WordId::new(id), german, english, None, None, Some(Level::A1))?;
    Ok(word)
}

fn exercise(
    id: &str,
    question: &str,
    options: &[&str],
    correct: &str,
) -> Result<Exercise, lesson_core::Error> {
    let exercise = Exercise::new(
        ExerciseId::new(id),
        question,
        options.iter().map(ToString::to_string).collect(),
        correct,
    )?;
    Ok(exercise)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let clock = Clock::default_clock();

    let (lessons, quiz_loop, practice_loop): (
        Arc<dyn LessonRepository>,
        Arc<QuizLoopService>,
        Arc<PracticeLoopService>,
    ) = if parsed.offline {
        info!("running against the built-in offline lesson");
        let backend = seed_offline_backend()?;
        (
            backend.clone(),
            Arc::new(QuizLoopService::new(clock, backend.clone(), backend.clone())),
            Arc::new(PracticeLoopService::new(clock, backend)),
        )
    } else {
        let config = parsed
            .api_url
            .map_or_else(ApiConfig::from_env, ApiConfig::new);
        info!(base_url = %config.base_url, "connecting to the lesson API");
        let backend = Arc::new(HttpBackend::new(&config));
        (
            backend.clone(),
            Arc::new(QuizLoopService::new(clock, backend.clone(), backend.clone())),
            Arc::new(PracticeLoopService::new(clock, backend)),
        )
    };

    let speech = SpeechService::new(
        CommandSynthesizer::detect().map(|synth| Arc::new(synth) as Arc<dyn Synthesizer>),
    );
    if !speech.enabled() {
        info!("no text-to-speech binary found; listen buttons will be disabled");
    }

    let app = DesktopApp {
        locale: parsed.locale,
        lessons,
        quiz_loop,
        practice_loop,
        speech,
    };

    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    // Dioxus/tao can default to an always-on-top window in some dev setups.
    // Explicitly disable it so the app doesn't behave like a modal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Deutsch Lernen")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
