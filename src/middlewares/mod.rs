pub mod cron_middleware;
