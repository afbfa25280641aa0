mod integration;
mod liveness;
