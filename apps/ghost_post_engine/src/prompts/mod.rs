pub mod post_generator_prompt;
