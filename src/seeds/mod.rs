pub mod initial_users_seed;
