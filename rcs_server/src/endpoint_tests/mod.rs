mod decision;
mod details;
mod helpers;
mod mocks;
