mod property_tests;
mod sub_list_tests;
