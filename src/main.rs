use anyhow::{Context, Result};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use surveymap::camera::{CameraUpdateBroker, Viewport};
use surveymap::config::{load_config, MapConfig};
use surveymap::datacollection::PinResponseRecorder;
use surveymap::geometry::{CameraPosition, Point};
use surveymap::location::{Location, LocationSource};
use surveymap::mutation::{LoiMutation, MutationType, User};
use surveymap::survey::{Survey, SurveyRepository};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "surveymap=info".into()),
        )
        .init();

    let mut config = match std::env::var("SURVEYMAP_CONFIG") {
        Ok(path) => load_config(&path).context("Failed to load configuration")?,
        Err(_) => MapConfig::default(),
    };
    config.apply_env();

    info!("surveymap starting...");

    let locations = Arc::new(LocationSource::new(config.broker.location_buffer));
    let surveys = Arc::new(SurveyRepository::new());
    let broker = Arc::new(CameraUpdateBroker::new(
        Arc::clone(&locations),
        Arc::clone(&surveys),
        &config,
    ));
    let recorder = PinResponseRecorder::new("drop_a_pin", Arc::clone(&broker));

    // Map surface: apply every update to a viewport
    let mut stream = broker.subscribe();
    let default_zoom = config.camera.default_zoom_level;
    let map = tokio::spawn(async move {
        let mut viewport = Viewport::new(Point::ORIGIN, 2.0, default_zoom);
        while let Some(update) = stream.next().await {
            viewport.apply(&update);
            info!(
                update = %update,
                center = %viewport.center,
                zoom = viewport.zoom_level,
                "Camera moved"
            );
        }
    });

    // Simulated session
    surveys.set_camera_position(
        "survey_demo",
        CameraPosition::new(Point::new(-0.1276, 51.5072), 12.0),
    );
    surveys.activate_survey(Survey::new("survey_demo", "Demo survey"));
    tokio::time::sleep(Duration::from_millis(50)).await;

    for (lat, lng) in [(51.5010, -0.1416), (51.5014, -0.1419), (51.5019, -0.1423)] {
        locations.publish(Location::new(lat, lng).with_accuracy(8.0));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    recorder.record_position(CameraPosition::new(Point::new(-0.1425, 51.5021), 19.0));
    recorder.center_on_pin();
    tokio::time::sleep(Duration::from_millis(50)).await;

    if let Some(response) = recorder.response() {
        info!(task_id = %recorder.task_id(), answer = %response.details_text(), "Recorded answer");
    }

    // Turn the dropped pin into a new location of interest
    let user = User {
        id: "demo_user".to_string(),
        email: "demo@example.com".to_string(),
        display_name: "Demo".to_string(),
    };
    for pin in recorder.features() {
        let mutation = LoiMutation {
            loi_id: pin.id.clone(),
            survey_id: "survey_demo".to_string(),
            job_id: "job_demo".to_string(),
            mutation_type: MutationType::Create,
            location: pin.geometry.as_point().copied(),
            polygon_vertices: Vec::new(),
            client_timestamp: chrono::Utc::now(),
        };
        let feature = mutation.to_feature();
        match mutation.to_storage_map(&user) {
            Ok(map) => info!(
                loi_id = %feature.id,
                fields = map.len(),
                "Location of interest ready to store"
            ),
            Err(e) => warn!(loi_id = %feature.id, error = %e, "Cannot store location of interest"),
        }
    }

    map.abort();
    info!("surveymap done");

    Ok(())
}
