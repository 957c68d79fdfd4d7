#![cfg(test)]

mod discovery;
mod interface;
