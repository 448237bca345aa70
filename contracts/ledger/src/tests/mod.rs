mod fixture;

pub use fixture::AsaSwapTest;
