pub mod deepgram_backend;
