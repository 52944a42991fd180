use std::sync::Arc;

use dealer_matcher::models::config::ServerConfig;
use dealer_matcher::processing::matcher::Matcher;
use dealer_matcher::processing::recommendation::process_recommendation_message;
use dealer_matcher::processing::{ZMQMessage, ZMQReply};
use dealer_matcher::repository::JsonCatalogRepository;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let defaults = match config.matcher.to_request() {
        Ok(defaults) => defaults,
        Err(e) => {
            log::error!("Invalid matcher defaults: {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Loaded vocabularies: catalog={} tokens, dealer={} tokens",
        config.vocabulary.catalog.len(),
        config.vocabulary.dealer.len()
    );

    let repo = Arc::new(JsonCatalogRepository::new(&config.catalog_path));
    let matcher = Arc::new(Matcher::new(config.vocabulary, config.scorer));

    let context = zmq::Context::new();
    let responder = context.socket(zmq::REP).expect("Cannot create zmq socket");
    responder
        .bind(&config.zmq_address)
        .expect("Cannot bind to zmq port");
    log::info!("Waiting for recommendation requests on {}", config.zmq_address);

    loop {
        let msg = match responder.recv_bytes(0) {
            Ok(msg) => msg,
            Err(e) => {
                log::error!("Failed to receive message: {e}");
                continue;
            }
        };

        let reply = match serde_json::from_slice::<ZMQMessage>(&msg) {
            Ok(ZMQMessage::Recommend(request)) => {
                let repo = Arc::clone(&repo);
                let matcher = Arc::clone(&matcher);
                match tokio::task::spawn_blocking(move || {
                    process_recommendation_message(
                        request,
                        repo.as_ref(),
                        matcher.as_ref(),
                        defaults,
                    )
                })
                .await
                {
                    Ok(reply) => reply,
                    Err(e) => {
                        log::error!("Recommendation task failed: {e}");
                        ZMQReply::Error("recommendation task failed".to_string())
                    }
                }
            }
            Err(e) => {
                log::error!("Failed to parse JSON: {e}");
                ZMQReply::Error(format!("malformed message: {e}"))
            }
        };

        // A REP socket must answer every request before receiving the next.
        let payload = serde_json::to_vec(&reply).unwrap_or_else(|e| {
            log::error!("Failed to serialize reply: {e}");
            br#"{"Error":"internal error"}"#.to_vec()
        });
        if let Err(e) = responder.send(payload, 0) {
            log::error!("Failed to send reply: {e}");
        }
    }
}
