pub mod splittable_task;
