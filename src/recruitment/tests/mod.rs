mod common;
mod export;
mod promotion;
