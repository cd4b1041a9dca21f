mod config;
mod quiz;
mod render;

use std::sync::Arc;

use dotenv::dotenv;
use log::{info, warn};
use teloxide::{
    dispatching::dialogue::InMemStorage,
    prelude::*,
    types::ParseMode,
};

use config::Config;
use quiz::{Phase, Quiz, QuizCatalog, QuizError};
use render::{RESTART_COMMAND, RETAKE_QUIZ};

type QuizDialogue = Dialogue<State, InMemStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    Answering {
        quiz: Quiz,
    },
    Finished {
        quiz: Quiz,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();
    info!("Starting StudyMate bot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let catalog = match config.load_catalog() {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            log::error!("Failed to load the quiz catalog: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Catalog loaded: {} questions{}",
        catalog.len(),
        match &config.catalog_path {
            Some(path) => format!(" from {}", path.display()),
            None => " (built-in)".to_string(),
        }
    );

    let bot = Bot::from_env();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, InMemStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::Answering { quiz }].endpoint(answer_question))
            .branch(dptree::case![State::Finished { quiz }].endpoint(show_result)),
    )
    .dependencies(dptree::deps![
        InMemStorage::<State>::new(),
        catalog,
        Arc::new(config)
    ])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

async fn start(
    bot: Bot,
    dialogue: QuizDialogue,
    catalog: Arc<QuizCatalog>,
    msg: Message,
) -> HandlerResult {
    bot.send_message(msg.chat.id, render::greeting())
        .parse_mode(ParseMode::Html)
        .await?;

    let quiz = Quiz::new(catalog);
    send_question(&bot, msg.chat.id, &quiz).await?;
    dialogue.update(State::Answering { quiz }).await?;
    Ok(())
}

async fn answer_question(
    bot: Bot,
    dialogue: QuizDialogue,
    mut quiz: Quiz,
    config: Arc<Config>,
    msg: Message,
) -> HandlerResult {
    let text = match msg.text() {
        Some(text) => text,
        None => {
            bot.send_message(msg.chat.id, "Please pick one of the options below.")
                .await?;
            send_question(&bot, msg.chat.id, &quiz).await?;
            return Ok(());
        }
    };

    if text == RESTART_COMMAND {
        quiz.reset();
        send_question(&bot, msg.chat.id, &quiz).await?;
        dialogue.update(State::Answering { quiz }).await?;
        return Ok(());
    }

    match quiz.choose(text) {
        Ok(Phase::InProgress) => {
            send_question(&bot, msg.chat.id, &quiz).await?;
            dialogue.update(State::Answering { quiz }).await?;
        }
        Ok(Phase::Complete) => {
            if let Some(best) = quiz.best() {
                info!("Chat {} finished the quiz: {}", msg.chat.id.0, best.method());
            }
            send_result(&bot, msg.chat.id, &quiz, &config).await?;
            dialogue.update(State::Finished { quiz }).await?;
        }
        Err(QuizError::UnknownOption(label)) => {
            warn!("Chat {} sent an unknown option: {:?}", msg.chat.id.0, label);
            bot.send_message(msg.chat.id, "Please pick one of the options below.")
                .await?;
            send_question(&bot, msg.chat.id, &quiz).await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn show_result(
    bot: Bot,
    dialogue: QuizDialogue,
    mut quiz: Quiz,
    config: Arc<Config>,
    msg: Message,
) -> HandlerResult {
    match msg.text() {
        Some(RETAKE_QUIZ) | Some(RESTART_COMMAND) => {
            quiz.reset();
            send_question(&bot, msg.chat.id, &quiz).await?;
            dialogue.update(State::Answering { quiz }).await?;
        }
        _ => {
            send_result(&bot, msg.chat.id, &quiz, &config).await?;
        }
    }
    Ok(())
}

async fn send_question(bot: &Bot, chat_id: ChatId, quiz: &Quiz) -> HandlerResult {
    // Rendering the stored presentation keeps the keyboard and the score
    // mapping in sync, even when the same question is sent twice.
    let question = match quiz.current_question() {
        Some(question) => question,
        None => return Err(QuizError::AlreadyComplete.into()),
    };

    bot.send_message(chat_id, render::question_text(question, quiz.question_count()))
        .parse_mode(ParseMode::Html)
        .reply_markup(render::question_keyboard(question))
        .await?;
    Ok(())
}

async fn send_result(bot: &Bot, chat_id: ChatId, quiz: &Quiz, config: &Config) -> HandlerResult {
    let (best, results) = match (quiz.best(), quiz.results()) {
        (Some(best), Some(results)) => (best, results),
        _ => return Err("quiz has no results to show".into()),
    };

    bot.send_message(chat_id, render::result_text(best, results, config))
        .parse_mode(ParseMode::Html)
        .reply_markup(render::retake_keyboard())
        .await?;
    Ok(())
}
