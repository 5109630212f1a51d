mod translate_test;
