pub mod mock_duo_server;
pub mod recording_api;
pub mod truncated_server;
