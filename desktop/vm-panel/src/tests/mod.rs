mod app;
mod doctor;
mod interactive;
mod logging;
mod terminal;
